use contactflow_api::ApiContext;
use lambda_http::{Error, Request, run, service_fn};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // JSON lines for CloudWatch
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_current_span(true)
        .init();

    let ctx = ApiContext::new().await?;
    info!(
        version = contactflow_core::VERSION,
        recipient = %contactflow_core::utils::redact_email(&ctx.notifications.config().to_email),
        "Contact notification endpoint ready"
    );

    run(service_fn(move |event: Request| {
        let ctx = ctx.clone();
        async move { contactflow_api::handler(ctx, event).await }
    }))
    .await
}
