use basic_bpe::BasicTokenizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 256 bytes + 4 merges
    let mut tokenizer = BasicTokenizer::new();
    println!("--- Training ---");
    tokenizer.train("MY name is Rajdeep Aher", 260, true)?;

    println!("\n--- Learned Merges ---");
    for (pair, tok) in tokenizer.merge_history() {
        let rendered = tokenizer.render_token(*tok).unwrap_or_default();
        println!("{pair} -> {tok} {rendered:?}");
    }

    let text = "abracadabra";
    println!("\n--- Encoding {text:?} ---");
    let ids = tokenizer.encode(text);
    println!("Encoded IDs: {ids:?}");

    let decoded = tokenizer.decode(&ids)?;
    println!("Decoded string: {decoded}");

    if decoded == text {
        println!("\nRound trip matched.");
    } else {
        println!("\nRound trip mismatch.");
    }

    Ok(())
}
