use anyhow::Result;
use cora::api::AgentClient;
use cora::config::Config;
use cora::runtime::TurnDriver;
use cora::script::USER_INPUTS;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let outcome = tokio::select! {
        result = run() => Some(result),
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => None,
            Err(error) => Some(Err(error.into())),
        },
    };

    let code = match outcome {
        Some(Ok(())) => ExitCode::SUCCESS,
        Some(Err(error)) => {
            eprintln!("An unexpected error occurred: {error:#}");
            ExitCode::FAILURE
        }
        None => {
            println!("\nProgram interrupted by user");
            ExitCode::from(130)
        }
    };
    println!("Program finished.");
    code
}

async fn run() -> Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let client = AgentClient::new(&config)?;
    let mut driver = TurnDriver::new(client, std::io::stdout());
    driver.run_script(USER_INPUTS).await?;

    println!("\n--- All tasks completed successfully ---");
    Ok(())
}
