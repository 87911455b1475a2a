// tests/generate.rs

mod common;
use crate::common::{FakeProvider, init_tracing};

use std::error::Error;

use jsonsmith::generate::Generator;
use jsonsmith::style::Styler;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn completion_is_trimmed_and_sent_once() -> TestResult {
    init_tracing();

    let provider = FakeProvider::replying("\n\n  .items[] | .id \n");
    let mut diag = Vec::new();

    let program = Generator::new(&provider)
        .with_temperature(Some(0.0))
        .generate("sys", "ids please", &mut diag)
        .await?;

    assert_eq!(program, ".items[] | .id");
    assert!(diag.is_empty(), "quiet unless verbose");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system, "sys");
    assert_eq!(requests[0].prompt, "ids please");
    assert_eq!(requests[0].temperature, Some(0.0));
    Ok(())
}

#[tokio::test]
async fn verbose_writes_system_prompt_and_response() -> TestResult {
    init_tracing();

    let provider = FakeProvider::replying(" .a ");
    let mut diag = Vec::new();

    Generator::new(&provider)
        .with_styler(Styler::plain())
        .verbose(true)
        .generate("be terse", "field a", &mut diag)
        .await?;

    assert_eq!(
        String::from_utf8(diag)?,
        "System:\nbe terse\nPrompt:\nfield a\nResponse:\n.a\n"
    );
    Ok(())
}

#[tokio::test]
async fn verbose_prompt_is_written_even_when_backend_fails() -> TestResult {
    init_tracing();

    let provider = FakeProvider::failing("unauthorized");
    let mut diag = Vec::new();

    let result = Generator::new(&provider)
        .verbose(true)
        .generate("sys", "p", &mut diag)
        .await;

    assert!(result.is_err());
    let diag = String::from_utf8(diag)?;
    assert!(diag.contains("Prompt:\np\n"));
    assert!(!diag.contains("Response:"));
    Ok(())
}
