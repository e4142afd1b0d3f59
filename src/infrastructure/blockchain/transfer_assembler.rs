//! System-program transfer transactions tagged with an order reference

use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::Message,
    system_instruction,
    transaction::Transaction,
};
use tracing::debug;

use crate::domain::checkout::{PaymentIntent, TransactionAssembler};
use crate::shared::errors::ChainError;

/// Solana transaction size limit in bytes
pub const MAX_TRANSACTION_SIZE: usize = 1232;

/// Assembles a single SOL transfer, fee paid by the buyer
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTransferAssembler;

impl SystemTransferAssembler {
    /// Transfer instruction with the order address appended as a read-only, non-signing key
    pub fn transfer_instruction(payment: &PaymentIntent) -> Instruction {
        let mut instruction = system_instruction::transfer(&payment.buyer, &payment.seller, payment.lamports);
        instruction
            .accounts
            .push(AccountMeta::new_readonly(payment.order, false));
        instruction
    }

    /// Unsigned transaction: one zeroed signature slot for the fee payer
    pub fn build_transaction(payment: &PaymentIntent, recent_blockhash: Hash) -> Transaction {
        let instruction = Self::transfer_instruction(payment);
        let mut message = Message::new(&[instruction], Some(&payment.buyer));
        message.recent_blockhash = recent_blockhash;
        Transaction::new_unsigned(message)
    }
}

impl TransactionAssembler for SystemTransferAssembler {
    fn assemble(&self, payment: &PaymentIntent, recent_blockhash: Hash) -> Result<Vec<u8>, ChainError> {
        let transaction = Self::build_transaction(payment, recent_blockhash);
        let bytes = bincode::serialize(&transaction)
            .map_err(|e| ChainError::Serialization(e.to_string()))?;

        if bytes.len() > MAX_TRANSACTION_SIZE {
            return Err(ChainError::Serialization(format!(
                "Transaction too large: {} bytes",
                bytes.len()
            )));
        }

        debug!("📝 Transaction size: {} bytes", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{pubkey::Pubkey, signature::Signature, system_instruction::SystemInstruction, system_program};

    fn payment(lamports: u64) -> PaymentIntent {
        PaymentIntent {
            buyer: Pubkey::new_unique(),
            seller: Pubkey::new_unique(),
            order: Pubkey::new_unique(),
            lamports,
        }
    }

    fn is_writable(message: &Message, i: usize) -> bool {
        let header = &message.header;
        let signed = header.num_required_signatures as usize;
        if i < signed {
            i < signed - header.num_readonly_signed_accounts as usize
        } else {
            i < message.account_keys.len() - header.num_readonly_unsigned_accounts as usize
        }
    }

    #[test]
    fn test_assembled_transaction_decodes() {
        let payment = payment(1_500_000_000);
        let hash = Hash::new_from_array([3; 32]);
        let bytes = SystemTransferAssembler.assemble(&payment, hash).unwrap();
        let tx: Transaction = bincode::deserialize(&bytes).unwrap();
        let message = &tx.message;

        // Fee payer first, one empty signature awaiting the wallet
        assert_eq!(message.account_keys[0], payment.buyer);
        assert_eq!(message.recent_blockhash, hash);
        assert_eq!(tx.signatures, vec![Signature::default()]);
        assert_eq!(message.header.num_required_signatures, 1);

        assert_eq!(message.instructions.len(), 1);
        let ix = &message.instructions[0];
        assert_eq!(message.account_keys[ix.program_id_index as usize], system_program::id());

        let keys: Vec<Pubkey> = ix.accounts.iter().map(|&i| message.account_keys[i as usize]).collect();
        assert_eq!(keys, vec![payment.buyer, payment.seller, payment.order]);

        match bincode::deserialize::<SystemInstruction>(&ix.data).unwrap() {
            SystemInstruction::Transfer { lamports } => assert_eq!(lamports, 1_500_000_000),
            other => panic!("unexpected instruction: {:?}", other),
        }
    }

    #[test]
    fn test_order_reference_is_readonly_and_unsigned() {
        let payment = payment(1);
        let tx = SystemTransferAssembler::build_transaction(&payment, Hash::default());
        let message = &tx.message;
        let order_index = message
            .account_keys
            .iter()
            .position(|k| *k == payment.order)
            .unwrap();
        let seller_index = message
            .account_keys
            .iter()
            .position(|k| *k == payment.seller)
            .unwrap();

        assert!(!message.is_signer(order_index));
        assert!(!is_writable(message, order_index));
        assert!(!message.is_signer(seller_index));
        assert!(is_writable(message, seller_index));
        assert!(is_writable(message, 0));
    }

    #[test]
    fn test_blockhash_is_the_only_difference() {
        let payment = payment(42);
        let a = SystemTransferAssembler.assemble(&payment, Hash::new_from_array([1; 32])).unwrap();
        let b = SystemTransferAssembler.assemble(&payment, Hash::new_from_array([2; 32])).unwrap();
        let mut tx_a: Transaction = bincode::deserialize(&a).unwrap();
        let tx_b: Transaction = bincode::deserialize(&b).unwrap();

        assert_ne!(tx_a.message.recent_blockhash, tx_b.message.recent_blockhash);
        tx_a.message.recent_blockhash = tx_b.message.recent_blockhash;
        assert_eq!(tx_a, tx_b);
    }
}
