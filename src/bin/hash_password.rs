#[cfg(feature = "ssr")]
fn main() {
    use std::env;
    use swisstravel::auth::secure::hash_password;

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        println!("Usage: {} <password>", args[0]);
        std::process::exit(1);
    }

    match hash_password(&args[1]) {
        Ok(encoded) => {
            println!("Base64 encoded hash:");
            println!("{encoded}");
            println!("\nAdd to .env:");
            println!("ADMIN_PASSWORD_HASH='{encoded}'");
        }
        Err(e) => {
            eprintln!("Error hashing password: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("This binary requires the 'ssr' feature");
    std::process::exit(1);
}
