use clap::Parser;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the running server
    #[arg(default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Number of sample submissions to post
    #[arg(default_value_t = 1)]
    count: u32,

    /// Sweep the pending queue with a bulk retry afterwards
    #[arg(long)]
    retry: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let client = reqwest::Client::new();

    for i in 0..args.count {
        let form = json!({
            "name": "Thabo",
            "surname": format!("Mokoena-{i}"),
            "id_number": "9001015009087",
            "gender": "Male",
            "sector": "Private",
            "disability": "No",
            "nationality": "South African",
            "province": "KwaZulu-Natal",
            "municipality": "Msunduzi",
            "ward": "23",
            "qualifications": "Matric"
        });

        let response = client
            .post(format!("{}/affiliate", args.base_url))
            .json(&form)
            .send()
            .await
            .unwrap();

        println!("POST /affiliate -> {}", response.status());
        println!("{}\n", response.text().await.unwrap());
    }

    let pending = client
        .get(format!("{}/pending", args.base_url))
        .send()
        .await
        .unwrap();

    println!("GET /pending -> {}", pending.status());
    println!("{}\n", pending.text().await.unwrap());

    if args.retry {
        let summary = client
            .post(format!("{}/pending/retry", args.base_url))
            .send()
            .await
            .unwrap();

        println!("POST /pending/retry -> {}", summary.status());
        println!("{}", summary.text().await.unwrap());
    }
}
