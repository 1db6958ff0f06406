//! In-memory payment ledger.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, PaymentId, ReservationId};
use crate::domain::payment::Payment;
use crate::ports::PaymentLedger;

/// In-memory implementation of [`PaymentLedger`].
#[derive(Debug, Default)]
pub struct InMemoryPaymentLedger {
    payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
}

impl InMemoryPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentLedger for InMemoryPaymentLedger {
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;
        payments.insert(*payment.id(), payment.clone());
        Ok(())
    }

    async fn find_by_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Vec<Payment>, DomainError> {
        let payments = self.payments.read().await;
        let mut matching: Vec<Payment> = payments
            .values()
            .filter(|p| p.reservation_id() == reservation_id)
            .cloned()
            .collect();
        matching.sort_by_key(|p| *p.created_at());
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn payments_attach_to_their_reservation() {
        let ledger = InMemoryPaymentLedger::new();
        let reservation_id = ReservationId::new();

        let payment =
            Payment::new(PaymentId::new(), reservation_id, 2500, "card".into()).unwrap();
        ledger.insert(&payment).await.unwrap();

        let found = ledger.find_by_reservation(&reservation_id).await.unwrap();
        assert_eq!(found, vec![payment]);
        assert!(ledger
            .find_by_reservation(&ReservationId::new())
            .await
            .unwrap()
            .is_empty());
    }
}
