//! Example demonstrating loading and rendering cookie headers.
//!
//! Run with: cargo run --example cookie_usage

use ri_http_cookies::{Attr, SimpleCookie};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    // discarded headers are reported at debug level
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    // Example 1: Basic cookie parsing
    println!("=== Example 1: Basic Cookie Parsing ===");
    let cookies = SimpleCookie::parse("name=value; name2=value2; name3=value3").expect("header should load");

    println!("Parsed {} cookies:", cookies.len());
    for (name, morsel) in &cookies {
        println!("  {} = {}", name, morsel.value().unwrap_or_default());
    }

    // Example 2: Quoted values with escapes and attributes
    println!("\n=== Example 2: Quoted Values and Attributes ===");
    let header = r#"Customer="WILE_E_COYOTE\054 Genius"; Version=1; Path=/acme; Secure"#;
    let cookies = SimpleCookie::parse(header).expect("header should load");

    let morsel = cookies.get("Customer").expect("cookie should be present");
    println!("  value       = {}", morsel.value().unwrap_or_default());
    println!("  coded value = {}", morsel.coded_value().unwrap_or_default());
    println!("  path        = {}", morsel.attr(Attr::Path));
    println!("{}", cookies.output(None));
    println!("{}", cookies.output(Some(&[Attr::Path])));

    // Example 3: Building cookies for a response
    println!("\n=== Example 3: Building Set-Cookie Headers ===");
    let mut cookies = SimpleCookie::new();
    cookies.insert("session", "abc;def").expect("legal cookie name");
    cookies.insert("theme", "dark").expect("legal cookie name");

    let session = cookies.get_mut("session").expect("cookie was just inserted");
    session.insert("httponly", true).expect("reserved attribute");
    session.insert("max-age", 3600).expect("reserved attribute");
    session.insert("samesite", "Strict").expect("reserved attribute");

    println!("{}", cookies.output_with(None, "Set-Cookie:", "\n"));
    print!("{}", cookies.js_output(None));

    // Example 4: Malformed headers leave the collection untouched
    println!("\n=== Example 4: Malformed Headers ===");
    let before = cookies.len();
    cookies.load("foo=bar; baz").expect("discarded silently");
    println!("  cookies before: {before}, after: {}", cookies.len());

    match cookies.load("a=b, c=d") {
        Ok(()) => println!("  loaded"),
        Err(e) => println!("  rejected: {e}"),
    }
}
