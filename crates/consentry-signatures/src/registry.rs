//! Static signature tables and their two matching policies.

use once_cell::sync::Lazy;
use regex::Regex;

/// A named pattern matcher against rendered markup.
#[derive(Debug)]
pub struct Signature {
    name: &'static str,
    pattern: Regex,
}

impl Signature {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            // Case-insensitive by contract for every registry entry.
            pattern: Regex::new(&format!("(?i){pattern}"))
                .expect("signature patterns are hardcoded and valid"),
        }
    }

    /// Vendor name reported when the signature matches.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Test the signature against raw markup.
    #[must_use]
    pub fn matches(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

/// Accumulate-all matcher set: every matching signature contributes a hit.
///
/// Used for categories where multiple vendors legitimately coexist on one
/// page (CMP, TMS, pixels).
#[derive(Debug)]
pub struct SignatureSet {
    signatures: Vec<Signature>,
}

impl SignatureSet {
    fn new(entries: &[(&'static str, &str)]) -> Self {
        Self {
            signatures: entries
                .iter()
                .map(|(name, pattern)| Signature::new(name, pattern))
                .collect(),
        }
    }

    /// Collect the names of all matching signatures, in declaration order.
    #[must_use]
    pub fn match_all(&self, content: &str) -> Vec<String> {
        self.signatures
            .iter()
            .filter(|sig| sig.matches(content))
            .map(|sig| sig.name.to_string())
            .collect()
    }

    /// Number of signatures in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

/// First-match-wins matcher set: declaration order is the priority order.
///
/// Used for CMS detection, where a page reports exactly one platform and
/// reordering entries is a behavior change.
#[derive(Debug)]
pub struct OrderedSignatureSet {
    signatures: Vec<Signature>,
}

impl OrderedSignatureSet {
    fn new(entries: &[(&'static str, &str)]) -> Self {
        Self {
            signatures: entries
                .iter()
                .map(|(name, pattern)| Signature::new(name, pattern))
                .collect(),
        }
    }

    /// Name of the first matching signature, or `None` when nothing matches.
    #[must_use]
    pub fn match_first(&self, content: &str) -> Option<&'static str> {
        self.signatures
            .iter()
            .find(|sig| sig.matches(content))
            .map(Signature::name)
    }

    /// Number of signatures in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

/// Consent-management platform signatures.
pub static CMP_SIGNATURES: Lazy<SignatureSet> = Lazy::new(|| {
    SignatureSet::new(&[
        ("Didomi", r"didomi"),
        ("OneTrust", r"onetrust"),
        ("Axeptio", r"axeptio"),
        ("Cookiebot", r"cookiebot"),
        ("Quantcast", r"quantcast"),
        ("TrustArc", r"trustarc"),
        ("Civic", r"civic"),
        ("Usercentrics", r"usercentrics"),
        ("Tarte au citron", r"tarteaucitron"),
        ("Commanders Act", r"tagcommander|commandersact"),
    ])
});

/// Content-management system signatures. Order is the priority order; do
/// not reorder entries without accepting a behavior change.
pub static CMS_SIGNATURES: Lazy<OrderedSignatureSet> = Lazy::new(|| {
    OrderedSignatureSet::new(&[
        ("WordPress", r"wp-content|wordpress"),
        ("Shopify", r"shopify|cdn\.shopify\.com"),
        ("PrestaShop", r"prestashop"),
        ("Magento", r"magento"),
        ("Joomla", r"joomla"),
        ("WooCommerce", r"woocommerce"),
        ("Webflow", r"webflow"),
        ("Wix", r"wix\.com"),
    ])
});

/// Tag-management system signatures.
pub static TMS_SIGNATURES: Lazy<SignatureSet> = Lazy::new(|| {
    SignatureSet::new(&[
        (
            "Google Tag Manager",
            r"googletagmanager\.com/gtm\.js|GTM-[\w\d]+",
        ),
        ("Commanders Act", r"cdn\.tagcommander\.com|commandersact"),
        ("Tealium", r"tealium|tags\.tiqcdn\.com"),
        ("Adobe Launch", r"adobedtm\.com|launch"),
        ("Piwik PRO", r"tag\.piwik\.pro|ppms\.js"),
    ])
});

/// Marketing pixel signatures.
pub static PIXEL_SIGNATURES: Lazy<SignatureSet> = Lazy::new(|| {
    SignatureSet::new(&[
        ("Meta", r"facebook\.net/en_US/fbevents\.js|fbq\("),
        ("Google Ads", r"googleadservices\.com|gtag\(.*AW-\d+"),
        (
            "LinkedIn",
            r"snap\.licdn\.com/li\.lms-analytics|_linkedin_partner_id",
        ),
        ("TikTok", r"analytics\.tiktok\.com|ttq\("),
        ("Microsoft Ads", r"bat\.bing\.com/bat\.js|_uetq"),
        ("Snapchat", r"snaptr\(|sc-static\.net/scevent"),
        ("Pinterest", r"pintrk\("),
    ])
});
