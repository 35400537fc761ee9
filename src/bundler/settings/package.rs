//! Package metadata and configuration.

/// Package metadata and configuration.
///
/// Contains the product information written into the WiX `Product` and
/// `Package` elements. This typically maps from `Cargo.toml` `[package]`.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "Acme".into(),
///     version: "1.0.0".into(),
///     description: "ACME is the best company ever".into(),
///     manufacturer: "Acme Technologies".into(),
///     homepage: Some("https://example.com".into()),
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Product name displayed to users.
    ///
    /// Also names the produced `.wxs`, `.wixobj` and `.msi` files.
    pub product_name: String,

    /// Version string.
    ///
    /// Must be 1-4 numeric dot-separated parts; a semver pre-release suffix
    /// is stripped. Example: "1.0.0", "2.3.4.5"
    pub version: String,

    /// Brief description of the application.
    pub description: String,

    /// Manufacturer (publisher) name.
    pub manufacturer: String,

    /// Homepage URL, shown in Add/Remove Programs.
    ///
    /// Default: None
    pub homepage: Option<String>,
}
