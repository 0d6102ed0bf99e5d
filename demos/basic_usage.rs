use gsg_client::{GatewayConfig, GsgClient, ParamSet, ParamValue};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Initialize the client with your project credentials
    let config = GatewayConfig::new(
        std::env::var("GSG_PROJECT")
            .unwrap_or_else(|_| "1290".to_string())
            .parse()?,
        std::env::var("GSG_SECRET").unwrap_or_else(|_| "your_secret".to_string()),
    );

    let client = GsgClient::new(config)?;

    // Example 1: List available payment systems
    println!("=== Payment Systems ===");
    match client.paysystems().await {
        Ok(paysystems) => println!("{}", serde_json::to_string_pretty(&paysystems)?),
        Err(e) => println!("paysystems failed: {}", e),
    }

    // Example 2: Check your balance
    println!("\n=== Main Balance ===");
    match client.main_balance().await {
        Ok(balance) => println!("{}", serde_json::to_string_pretty(&balance)?),
        Err(e) => println!("main_balance failed: {}", e),
    }

    // Example 3: Pre-pay check of payment possibility
    println!("\n=== Check ===");
    let mut extra = ParamSet::new();
    extra.insert("amount".to_string(), ParamValue::from(1));
    extra.insert("currency".to_string(), ParamValue::from("RUB"));

    match client.check(0, 7, "9522771693", extra).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);

            // Example 4: Initiate the payment with the invoice from check
            if let Some(invoice) = response.get("invoice").and_then(serde_json::Value::as_i64) {
                println!("\n=== Pay ===");
                match client.pay(invoice, 0, ParamSet::new()).await {
                    Ok(payment) => println!("{}", serde_json::to_string_pretty(&payment)?),
                    Err(e) => println!("pay failed: {}", e),
                }

                // Example 5: Check the payment status
                println!("\n=== Pay Status ===");
                match client.pay_status(invoice, 0).await {
                    Ok(status) => println!("{}", serde_json::to_string_pretty(&status)?),
                    Err(e) => println!("pay_status failed: {}", e),
                }
            }
        }
        Err(e) => println!("check failed: {}", e),
    }

    // Example 6: Look at the gateway's error description list
    println!("\n=== Error Catalog ===");
    match client.errors().await {
        Ok(errors) => println!("{}", serde_json::to_string_pretty(&errors)?),
        Err(e) => println!("errors failed: {}", e),
    }

    Ok(())
}
