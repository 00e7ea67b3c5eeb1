use plexus::Background;

fn main() {
    if let Err(e) = Background::new().run() {
        eprintln!("plexus: {}", e);
        std::process::exit(1);
    }
}
