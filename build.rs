fn main() {
    // Emits ESP-IDF link/search directives for device builds.
    // Host builds (no `espidf` feature) have nothing to do.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
