use super::payment::PaymentOrchestrator;
use crate::domain::payment::PaymentOutcome;
use crate::domain::ports::{Notice, NotifierRef, RegistrationApiRef};
use crate::domain::registration::{RegistrationForm, RegistrationId};
use crate::error::Result;
use tracing::{info, warn};

/// Result of a submitted registration.
///
/// The registration exists server-side whatever `payment` says; an unpaid
/// one simply stays pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub registration_id: RegistrationId,
    pub payment: PaymentOutcome,
}

impl RegistrationOutcome {
    pub fn is_complete(&self) -> bool {
        self.payment == PaymentOutcome::Completed
    }
}

/// Validates and submits the registration form, then hands off to payment.
pub struct RegistrationController {
    api: RegistrationApiRef,
    payments: PaymentOrchestrator,
    notifier: NotifierRef,
}

impl RegistrationController {
    pub fn new(api: RegistrationApiRef, payments: PaymentOrchestrator, notifier: NotifierRef) -> Self {
        Self {
            api,
            payments,
            notifier,
        }
    }

    /// Submits `form`.
    ///
    /// Returns an error, after notifying the user, when a required field is
    /// empty (no request is made) or when the backend rejects the
    /// registration. Payment problems are reported in the outcome instead.
    pub async fn submit(&self, form: &RegistrationForm) -> Result<RegistrationOutcome> {
        if let Err(e) = form.validate() {
            self.notifier
                .notify(Notice::error("Please fill all required fields"));
            return Err(e);
        }

        let receipt = match self.api.create_registration(form).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(error = %e, "registration rejected");
                self.notifier.notify(Notice::error(
                    e.user_message("Registration failed. Please try again."),
                ));
                return Err(e);
            }
        };

        let registration_id = receipt.registration_id;
        info!(%registration_id, "registration created");
        self.notifier.notify(Notice::success(
            "Registration created! Proceeding to payment...",
        ));

        let payment = self.payments.pay(&registration_id, &form.contact()).await;
        Ok(RegistrationOutcome {
            registration_id,
            payment,
        })
    }
}
