use captionkit_rs::captionkit::settings::settings;

fn main() {
    let config = settings();
    println!("captionkit-rs settings");
    println!("  vocab cache dir: {:?}", config.captionkit.vocab_cache_dir);
    println!("  allow empty vocab: {}", config.captionkit.allow_empty_vocab);
    println!("  ci: {}", config.testing.ci);
}
