use crate::domain::payment::{
    CheckoutOptions, CheckoutOutcome, PaymentOrderRequest, PaymentOutcome, PaymentVerification,
};
use crate::domain::ports::{Notice, NotifierRef, PaymentGatewayRef, RegistrationApiRef};
use crate::domain::registration::{Contact, RegistrationId};
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Drives one registration from order creation to backend confirmation.
///
/// The gateway script is loaded lazily on the first attempt and remembered for
/// the lifetime of the orchestrator. A failed load is not remembered, so the
/// next attempt tries again.
pub struct PaymentOrchestrator {
    api: RegistrationApiRef,
    gateway: PaymentGatewayRef,
    notifier: NotifierRef,
    gateway_loaded: OnceCell<()>,
}

impl PaymentOrchestrator {
    pub fn new(api: RegistrationApiRef, gateway: PaymentGatewayRef, notifier: NotifierRef) -> Self {
        Self {
            api,
            gateway,
            notifier,
            gateway_loaded: OnceCell::new(),
        }
    }

    /// Runs a payment attempt for an existing registration.
    ///
    /// Every failure is reported through the notifier and folded into the
    /// returned outcome; nothing is retried.
    pub async fn pay(&self, registration_id: &RegistrationId, contact: &Contact) -> PaymentOutcome {
        if let Err(e) = self
            .gateway_loaded
            .get_or_try_init(|| self.gateway.load())
            .await
        {
            warn!(%registration_id, error = %e, "payment gateway failed to load");
            self.notifier
                .notify(Notice::error("Failed to load payment gateway"));
            return PaymentOutcome::Unavailable;
        }

        let request = PaymentOrderRequest::new(registration_id.clone(), contact);
        let order = match self.api.create_order(&request).await {
            Ok(order) => order,
            Err(e) => {
                warn!(%registration_id, error = %e, "payment order creation failed");
                self.notifier
                    .notify(Notice::error("Failed to initiate payment"));
                return PaymentOutcome::Unavailable;
            }
        };
        info!(%registration_id, order_id = %order.order_id, "payment order created");

        let options = CheckoutOptions::new(&order, contact);
        let proof = match self.gateway.open(&options).await {
            Ok(CheckoutOutcome::Paid(proof)) => proof,
            Ok(CheckoutOutcome::Dismissed) => {
                info!(%registration_id, "checkout dismissed");
                self.notifier.notify(Notice::warning(
                    "Payment cancelled. You can complete payment later.",
                ));
                return PaymentOutcome::Dismissed;
            }
            Err(e) => {
                warn!(%registration_id, error = %e, "checkout widget failed");
                self.notifier
                    .notify(Notice::error("Failed to initiate payment"));
                return PaymentOutcome::Unavailable;
            }
        };

        let verification = PaymentVerification {
            proof,
            registration_id: registration_id.clone(),
        };
        let confirmed = match self.api.verify_payment(&verification).await {
            Ok(receipt) if receipt.is_success() => true,
            Ok(receipt) => {
                warn!(%registration_id, status = %receipt.status, "payment verification rejected");
                false
            }
            Err(e) => {
                warn!(%registration_id, error = %e, "payment verification failed");
                false
            }
        };

        if confirmed {
            info!(
                %registration_id,
                payment_id = %verification.proof.payment_id,
                "payment verified"
            );
            self.notifier.notify(Notice::success(
                "Payment successful! Registration complete.",
            ));
            PaymentOutcome::Completed
        } else {
            self.notifier.notify(Notice::error(
                "Payment verification failed. Please contact support.",
            ));
            PaymentOutcome::VerificationFailed
        }
    }
}
