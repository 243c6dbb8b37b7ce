fn main() {
    // Build-time overrides for the node constants (see src/config.rs).
    for var in [
        "THERMOPOST_WIFI_SSID",
        "THERMOPOST_WIFI_PASSWORD",
        "THERMOPOST_SERVER_URL",
        "THERMOPOST_DEVICE_ID",
    ] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
