#![allow(dead_code)]


use async_trait::async_trait;
use neuron::application::payment::PaymentOrchestrator;
use neuron::application::registration::RegistrationController;
use neuron::application::session::AdminSession;
use neuron::domain::payment::{
    Amount, CheckoutOptions, CheckoutOutcome, PaymentOrder, PaymentOrderRequest, PaymentProof,
    PaymentVerification, VerificationReceipt,
};
use neuron::domain::ports::{
    AdminApi, Navigator, Notice, NoticeLevel, Notifier, PaymentGateway, RegistrationApi,
};
use neuron::domain::registration::{
    PaymentStatus, Registration, RegistrationForm, RegistrationId, RegistrationReceipt,
};
use neuron::domain::session::{AccessToken, AdminCredentials, Route};
use neuron::domain::stats::RegistrationStats;
use neuron::error::{NeuronError, Result};
use neuron::infrastructure::in_memory::InMemoryTokenStore;
use rust_decimal_macros::dec;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const EXPORT_CSV: &str = "Registration ID,Full Name,Email,Phone,College,Team Name,Payment Status,Transaction ID,Amount (INR),Created At\n\
NEU1,Ada Lovelace,ada@example.com,9999999999,Analytical College,Engines,completed,pay_1,500.0,2025-01-01T10:00:00+00:00\n\
NEU2,Alan Turing,alan@example.com,8888888888,Kings College,,pending,,0,2025-01-02T10:00:00+00:00\n";

/// A canned backend answer: either a value or an HTTP failure.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Fail(u16, Option<&'static str>),
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Fail(401, detail) => Err(NeuronError::Unauthorized(detail.map(str::to_string))),
            Reply::Fail(status, detail) => Err(NeuronError::BackendError {
                status: *status,
                detail: detail.map(str::to_string),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateRegistration(RegistrationForm),
    CreateOrder(PaymentOrderRequest),
    Verify(PaymentVerification),
    Login(String),
    Registrations(String),
    Stats(String),
    Export(String),
}

/// Backend double that answers from canned replies and records every call.
pub struct FakeBackend {
    pub registration: Reply<String>,
    pub order: Reply<PaymentOrder>,
    pub verification: Reply<VerificationReceipt>,
    pub login: Reply<String>,
    pub registrations: Reply<Vec<Registration>>,
    pub stats: Reply<RegistrationStats>,
    pub export: Reply<Vec<u8>>,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            registration: Reply::Ok("R123".to_string()),
            order: Reply::Ok(sample_order()),
            verification: Reply::Ok(VerificationReceipt {
                status: "success".to_string(),
                message: Some("Payment verified successfully".to_string()),
            }),
            login: Reply::Ok("token-1".to_string()),
            registrations: Reply::Ok(vec![sample_registration("NEU1", PaymentStatus::Completed)]),
            stats: Reply::Ok(sample_stats()),
            export: Reply::Ok(EXPORT_CSV.as_bytes().to_vec()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn verify_calls(&self) -> Vec<PaymentVerification> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Verify(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn order_calls(&self) -> Vec<PaymentOrderRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateOrder(o) => Some(o),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl RegistrationApi for FakeBackend {
    async fn create_registration(&self, form: &RegistrationForm) -> Result<RegistrationReceipt> {
        self.record(Call::CreateRegistration(form.clone()));
        Ok(RegistrationReceipt {
            registration_id: RegistrationId::new(self.registration.get()?),
        })
    }

    async fn create_order(&self, request: &PaymentOrderRequest) -> Result<PaymentOrder> {
        self.record(Call::CreateOrder(request.clone()));
        self.order.get()
    }

    async fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> Result<VerificationReceipt> {
        self.record(Call::Verify(verification.clone()));
        self.verification.get()
    }
}

#[async_trait]
impl AdminApi for FakeBackend {
    async fn login(&self, credentials: &AdminCredentials) -> Result<AccessToken> {
        self.record(Call::Login(credentials.username.clone()));
        self.login.get().map(AccessToken::new)
    }

    async fn registrations(&self, token: &AccessToken) -> Result<Vec<Registration>> {
        self.record(Call::Registrations(token.as_str().to_string()));
        self.registrations.get()
    }

    async fn stats(&self, token: &AccessToken) -> Result<RegistrationStats> {
        self.record(Call::Stats(token.as_str().to_string()));
        self.stats.get()
    }

    async fn export(&self, token: &AccessToken) -> Result<Vec<u8>> {
        self.record(Call::Export(token.as_str().to_string()));
        self.export.get()
    }
}

#[derive(Debug, Clone)]
pub enum WidgetBehavior {
    Pay,
    Dismiss,
    Fail,
}

/// Payment widget double.
pub struct FakeGateway {
    /// Number of initial `load` calls that fail.
    pub failing_loads: AtomicUsize,
    pub loads: AtomicUsize,
    pub behavior: WidgetBehavior,
    pub opened: Mutex<Vec<CheckoutOptions>>,
}

impl FakeGateway {
    pub fn new(behavior: WidgetBehavior) -> Self {
        Self {
            failing_loads: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
            behavior,
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_first_loads(self, count: usize) -> Self {
        self.failing_loads.store(count, Ordering::SeqCst);
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> Vec<CheckoutOptions> {
        self.opened.lock().unwrap().clone()
    }
}

pub fn proof_for(order_id: &str) -> PaymentProof {
    PaymentProof {
        order_id: order_id.to_string(),
        payment_id: "pay_ABC".to_string(),
        signature: "sig_ABC".to_string(),
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn load(&self) -> Result<()> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failing_loads.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_loads.store(remaining - 1, Ordering::SeqCst);
            return Err(NeuronError::GatewayError("script blocked".to_string()));
        }
        Ok(())
    }

    async fn open(&self, options: &CheckoutOptions) -> Result<CheckoutOutcome> {
        self.opened.lock().unwrap().push(options.clone());
        match self.behavior {
            WidgetBehavior::Pay => Ok(CheckoutOutcome::Paid(proof_for(&options.order_id))),
            WidgetBehavior::Dismiss => Ok(CheckoutOutcome::Dismissed),
            WidgetBehavior::Fail => Err(NeuronError::GatewayError("widget crashed".to_string())),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.message).collect()
    }

    pub fn has(&self, level: NoticeLevel, message: &str) -> bool {
        self.notices()
            .iter()
            .any(|n| n.level == level && n.message == message)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub fn sample_order() -> PaymentOrder {
    PaymentOrder {
        order_id: "order_1".to_string(),
        amount: Amount::registration_fee(),
        currency: "INR".to_string(),
        key_id: "rzp_test_key".to_string(),
    }
}

pub fn sample_stats() -> RegistrationStats {
    RegistrationStats {
        total_registrations: 10,
        paid_registrations: 7,
        pending_registrations: 3,
        total_revenue_inr: dec!(3500),
    }
}

pub fn sample_registration(id: &str, status: PaymentStatus) -> Registration {
    Registration {
        id: format!("uuid-{id}"),
        registration_id: RegistrationId::new(id),
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "9999999999".to_string(),
        college: "Analytical College".to_string(),
        team_name: Some("Engines".to_string()),
        payment_status: status,
        transaction_id: None,
        order_id: None,
        amount: None,
        created_at: "2025-01-01T10:00:00Z".parse().unwrap(),
    }
}

pub fn filled_form() -> RegistrationForm {
    RegistrationForm {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "9999999999".to_string(),
        college: "Analytical College".to_string(),
        team_name: "Engines".to_string(),
        honeypot: String::new(),
    }
}

pub struct RegistrationHarness {
    pub backend: Arc<FakeBackend>,
    pub gateway: Arc<FakeGateway>,
    pub notifier: Arc<RecordingNotifier>,
    pub controller: RegistrationController,
}

pub fn registration_harness(backend: FakeBackend, gateway: FakeGateway) -> RegistrationHarness {
    let backend = Arc::new(backend);
    let gateway = Arc::new(gateway);
    let notifier = Arc::new(RecordingNotifier::default());
    let payments = PaymentOrchestrator::new(backend.clone(), gateway.clone(), notifier.clone());
    let controller = RegistrationController::new(backend.clone(), payments, notifier.clone());
    RegistrationHarness {
        backend,
        gateway,
        notifier,
        controller,
    }
}

pub struct AdminHarness {
    pub backend: Arc<FakeBackend>,
    pub tokens: InMemoryTokenStore,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub session: AdminSession,
}

pub fn admin_harness(backend: FakeBackend, tokens: InMemoryTokenStore) -> AdminHarness {
    let backend = Arc::new(backend);
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let session = AdminSession::new(
        backend.clone(),
        Arc::new(tokens.clone()),
        notifier.clone(),
        navigator.clone(),
    );
    AdminHarness {
        backend,
        tokens,
        notifier,
        navigator,
        session,
    }
}
