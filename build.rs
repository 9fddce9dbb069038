//! Injects Wi-Fi credentials and the ThingSpeak write key from the build
//! environment (or a local `.env` file) so secrets never live in source.

const SECRETS: [(&str, &str); 3] = [
    ("THERMOLINK_WIFI_SSID", "changeme"),
    ("THERMOLINK_WIFI_PASSWORD", "changeme"),
    ("THERMOLINK_API_KEY", "CHANGEME"),
];

fn main() {
    let _ = dotenvy::dotenv();
    println!("cargo:rerun-if-changed=.env");

    for (key, default) in SECRETS {
        let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
        println!("cargo:rustc-env={key}={value}");
        println!("cargo:rerun-if-env-changed={key}");
    }
}
