//! Example demonstrating cookie loading for use with reqwest.
//!
//! Run with: cargo run --example reqwest_usage --features reqwest

#[cfg(feature = "reqwest")]
fn main() {
    use reqwest::cookie::CookieStore;
    use ri_http_cookies::SimpleCookie;
    use ri_http_cookies::reqwest_support::add_to_jar;

    // Example: Loading cookies for use with reqwest
    println!("=== Cookie Loading for Reqwest ===");
    let cookies = SimpleCookie::parse(r#"session="abc;xyz"; user=john; token=abc123"#).expect("header should load");

    println!("Parsed {} cookies:", cookies.len());
    for cookie in cookies.to_cookies() {
        println!("  {} = {}", cookie.name(), cookie.value());
        println!("    String representation: {cookie}");
    }

    // The collection can be added to a reqwest CookieJar
    println!("\n=== Usage with Reqwest CookieJar ===");
    let jar = reqwest::cookie::Jar::default();
    let url: reqwest::Url = "https://example.com".parse().expect("valid url");
    add_to_jar(&cookies, &jar, &url);

    match jar.cookies(&url) {
        Some(header) => println!("Cookie header for {url}: {}", header.to_str().unwrap_or_default()),
        None => println!("No cookies stored for {url}"),
    }
}

#[cfg(not(feature = "reqwest"))]
fn main() {
    println!("Please run with --features reqwest");
    println!("Example: cargo run --example reqwest_usage --features reqwest");
}
