fn main() {
    match snap_craft_lib::run() {
        Ok(path) => println!("Screenshot saved as:\n{}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
