use crate::domain::payment::{CheckoutOptions, CheckoutOutcome, PaymentProof};
use crate::domain::ports::PaymentGateway;
use crate::error::{NeuronError, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::info;

type Input = Box<dyn AsyncBufRead + Unpin + Send>;
type Output = Box<dyn Write + Send>;

/// Checkout widget for a terminal.
///
/// Loading fetches the gateway's client script so an unreachable gateway is
/// detected before an order is created. Opening prints the order and asks
/// the operator for the payment id and signature the gateway issued; a blank
/// payment id (or end of input) means the checkout was dismissed.
pub struct ConsoleCheckout {
    client: reqwest::Client,
    script_url: Url,
    input: Mutex<Input>,
    output: Mutex<Output>,
}

impl ConsoleCheckout {
    pub fn new(client: reqwest::Client, script_url: Url) -> Self {
        Self::with_io(
            client,
            script_url,
            Box::new(BufReader::new(tokio::io::stdin())),
            Box::new(std::io::stdout()),
        )
    }

    pub fn with_io(client: reqwest::Client, script_url: Url, input: Input, output: Output) -> Self {
        Self {
            client,
            script_url,
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    async fn prompt(&self, label: &str) -> Result<Option<String>> {
        {
            let mut output = self.output.lock().await;
            write!(output, "{label}: ")?;
            output.flush()?;
        }
        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await?;
        let value = line.trim();
        if read == 0 || value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value.to_string()))
        }
    }
}

#[async_trait]
impl PaymentGateway for ConsoleCheckout {
    async fn load(&self) -> Result<()> {
        info!(url = %self.script_url, "loading checkout script");
        let response = self.client.get(self.script_url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(NeuronError::GatewayError(format!(
                "checkout script returned {}",
                response.status()
            )));
        }
        if response.bytes().await?.is_empty() {
            return Err(NeuronError::GatewayError(
                "checkout script is empty".to_string(),
            ));
        }
        Ok(())
    }

    async fn open(&self, options: &CheckoutOptions) -> Result<CheckoutOutcome> {
        {
            let mut output = self.output.lock().await;
            writeln!(output, "{}: {}", options.name, options.description)?;
            writeln!(output, "  order   {}", options.order_id)?;
            writeln!(
                output,
                "  amount  {:.2} {}",
                options.amount.major(),
                options.currency
            )?;
            writeln!(output, "  key     {}", options.key)?;
            writeln!(
                output,
                "  payer   {} <{}> {}",
                options.prefill.name, options.prefill.email, options.prefill.contact
            )?;
            writeln!(
                output,
                "Complete the payment with the gateway, then enter the details it returns."
            )?;
        }

        let Some(payment_id) = self
            .prompt("razorpay_payment_id (leave blank to cancel)")
            .await?
        else {
            return Ok(CheckoutOutcome::Dismissed);
        };
        let Some(signature) = self.prompt("razorpay_signature").await? else {
            return Ok(CheckoutOutcome::Dismissed);
        };

        Ok(CheckoutOutcome::Paid(PaymentProof {
            order_id: options.order_id.clone(),
            payment_id,
            signature,
        }))
    }
}
