//! Static keyword tables
//!
//! Keyword matching is plain data so the mapping can be audited and tested
//! independently of scoring. All entries are lowercase single tokens as
//! produced by [`crate::tokenize`] (hyphenated words arrive joined, so
//! "real-time" is matched as "realtime").

use estimo_core::{FeatureTag, ProjectType};

/// Keyword to feature tag.
pub const KEYWORD_TAGS: &[(&str, FeatureTag)] = &[
    // auth
    ("login", FeatureTag::Auth),
    ("logout", FeatureTag::Auth),
    ("signup", FeatureTag::Auth),
    ("signin", FeatureTag::Auth),
    ("oauth", FeatureTag::Auth),
    ("sso", FeatureTag::Auth),
    ("authentication", FeatureTag::Auth),
    ("registration", FeatureTag::Auth),
    ("password", FeatureTag::Auth),
    ("accounts", FeatureTag::Auth),
    // payments
    ("stripe", FeatureTag::Payments),
    ("paypal", FeatureTag::Payments),
    ("checkout", FeatureTag::Payments),
    ("payment", FeatureTag::Payments),
    ("payments", FeatureTag::Payments),
    ("billing", FeatureTag::Payments),
    ("subscription", FeatureTag::Payments),
    ("invoice", FeatureTag::Payments),
    // realtime
    ("realtime", FeatureTag::Realtime),
    ("websocket", FeatureTag::Realtime),
    ("websockets", FeatureTag::Realtime),
    ("live", FeatureTag::Realtime),
    ("chat", FeatureTag::Realtime),
    ("streaming", FeatureTag::Realtime),
    // search
    ("search", FeatureTag::Search),
    ("filter", FeatureTag::Search),
    ("filters", FeatureTag::Search),
    ("autocomplete", FeatureTag::Search),
    // file upload
    ("upload", FeatureTag::FileUpload),
    ("uploads", FeatureTag::FileUpload),
    ("attachment", FeatureTag::FileUpload),
    ("attachments", FeatureTag::FileUpload),
    ("images", FeatureTag::FileUpload),
    // admin
    ("admin", FeatureTag::AdminPanel),
    ("dashboard", FeatureTag::AdminPanel),
    ("backoffice", FeatureTag::AdminPanel),
    ("cms", FeatureTag::AdminPanel),
    // notifications
    ("notification", FeatureTag::Notifications),
    ("notifications", FeatureTag::Notifications),
    ("email", FeatureTag::Notifications),
    ("sms", FeatureTag::Notifications),
    ("push", FeatureTag::Notifications),
    // reporting
    ("report", FeatureTag::Reporting),
    ("reports", FeatureTag::Reporting),
    ("reporting", FeatureTag::Reporting),
    ("analytics", FeatureTag::Reporting),
    ("charts", FeatureTag::Reporting),
    ("export", FeatureTag::Reporting),
    // integrations
    ("api", FeatureTag::ApiIntegration),
    ("integration", FeatureTag::ApiIntegration),
    ("integrations", FeatureTag::ApiIntegration),
    ("webhook", FeatureTag::ApiIntegration),
    ("webhooks", FeatureTag::ApiIntegration),
    ("thirdparty", FeatureTag::ApiIntegration),
    // i18n
    ("i18n", FeatureTag::I18n),
    ("multilanguage", FeatureTag::I18n),
    ("multilingual", FeatureTag::I18n),
    ("localization", FeatureTag::I18n),
    ("translation", FeatureTag::I18n),
    // responsive
    ("responsive", FeatureTag::Responsive),
    ("mobilefriendly", FeatureTag::Responsive),
    ("adaptive", FeatureTag::Responsive),
    // catalog
    ("catalog", FeatureTag::Catalog),
    ("catalogue", FeatureTag::Catalog),
    ("product", FeatureTag::Catalog),
    ("products", FeatureTag::Catalog),
    ("inventory", FeatureTag::Catalog),
    // cart
    ("cart", FeatureTag::Cart),
    ("basket", FeatureTag::Cart),
    ("wishlist", FeatureTag::Cart),
    // security
    ("security", FeatureTag::Security),
    ("secure", FeatureTag::Security),
    ("encryption", FeatureTag::Security),
    ("authorization", FeatureTag::Security),
    ("permissions", FeatureTag::Security),
    ("gdpr", FeatureTag::Security),
    ("compliance", FeatureTag::Security),
    // performance
    ("performance", FeatureTag::Performance),
    ("scalable", FeatureTag::Performance),
    ("scalability", FeatureTag::Performance),
    ("caching", FeatureTag::Performance),
    ("optimize", FeatureTag::Performance),
    ("latency", FeatureTag::Performance),
    // machine learning
    ("ml", FeatureTag::MachineLearning),
    ("ai", FeatureTag::MachineLearning),
    ("recommendation", FeatureTag::MachineLearning),
    ("recommendations", FeatureTag::MachineLearning),
    ("prediction", FeatureTag::MachineLearning),
    ("nlp", FeatureTag::MachineLearning),
    ("tensorflow", FeatureTag::MachineLearning),
    ("pytorch", FeatureTag::MachineLearning),
];

/// Complexity units a fully-weighted tag contributes.
pub const TAG_BASE_COSTS: &[(FeatureTag, f64)] = &[
    (FeatureTag::Auth, 4.0),
    (FeatureTag::Payments, 6.0),
    (FeatureTag::Realtime, 8.0),
    (FeatureTag::Search, 4.0),
    (FeatureTag::FileUpload, 2.0),
    (FeatureTag::AdminPanel, 6.0),
    (FeatureTag::Notifications, 3.0),
    (FeatureTag::Reporting, 6.0),
    (FeatureTag::ApiIntegration, 3.0),
    (FeatureTag::I18n, 4.0),
    (FeatureTag::Responsive, 3.0),
    (FeatureTag::Catalog, 4.0),
    (FeatureTag::Cart, 4.0),
    (FeatureTag::Security, 5.0),
    (FeatureTag::Performance, 5.0),
    (FeatureTag::MachineLearning, 10.0),
];

/// Words carrying no feature signal.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in", "into",
    "is", "it", "its", "of", "on", "or", "our", "should", "so", "that", "the", "their", "then",
    "there", "this", "to", "us", "using", "we", "will", "with", "within", "would", "you",
    "your", "must", "can", "need", "needs", "want", "all", "any", "some", "also",
];

/// Words that signal unsettled scope.
pub const VAGUE_TERMS: &[&str] = &[
    "maybe", "possibly", "perhaps", "might", "unclear", "tbd", "tba", "somehow", "etc",
    "various", "whatever", "flexible", "undecided",
];

/// Description keywords per project type, checked in this order.
pub const PROJECT_TYPE_KEYWORDS: &[(ProjectType, &[&str])] = &[
    (
        ProjectType::ECommerce,
        &["ecommerce", "shop", "store", "storefront", "marketplace"],
    ),
    (
        ProjectType::MobileApp,
        &["mobile", "ios", "android", "smartphone"],
    ),
    (
        ProjectType::WebApp,
        &["webapp", "dashboard", "platform", "portal", "saas", "application"],
    ),
    (
        ProjectType::Website,
        &["website", "site", "landing", "portfolio", "blog"],
    ),
];

/// Technologies that imply a commerce project when the description is silent.
pub const COMMERCE_TECHNOLOGIES: &[&str] =
    &["stripe", "paypal", "shopify", "woocommerce", "magento"];

/// Tag for a keyword, if any.
pub fn tag_for_keyword(token: &str) -> Option<FeatureTag> {
    KEYWORD_TAGS
        .iter()
        .find(|(keyword, _)| *keyword == token)
        .map(|(_, tag)| *tag)
}

/// Base cost of a tag.
pub fn tag_base_cost(tag: FeatureTag) -> f64 {
    TAG_BASE_COSTS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, cost)| *cost)
        .unwrap_or(0.0)
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

pub fn is_vague_term(token: &str) -> bool {
    VAGUE_TERMS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_tag_has_keyword_and_cost() {
        for tag in FeatureTag::ALL {
            assert!(
                KEYWORD_TAGS.iter().any(|(_, t)| *t == tag),
                "no keyword for {}",
                tag
            );
            assert!(tag_base_cost(tag) > 0.0, "no cost for {}", tag);
        }
    }

    #[test]
    fn test_keywords_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for (keyword, _) in KEYWORD_TAGS {
            assert!(seen.insert(*keyword), "duplicate keyword {}", keyword);
            assert_eq!(*keyword, keyword.to_lowercase());
            assert!(keyword.chars().all(|c| c.is_alphanumeric()));
        }
    }

    #[test]
    fn test_no_keyword_is_a_stop_word() {
        for (keyword, _) in KEYWORD_TAGS {
            assert!(!is_stop_word(keyword), "{} is a stop word", keyword);
        }
        for term in VAGUE_TERMS {
            assert!(!is_stop_word(term), "{} is a stop word", term);
        }
    }

    #[test]
    fn test_spec_examples() {
        assert_eq!(tag_for_keyword("login"), Some(FeatureTag::Auth));
        assert_eq!(tag_for_keyword("oauth"), Some(FeatureTag::Auth));
        assert_eq!(tag_for_keyword("stripe"), Some(FeatureTag::Payments));
        assert_eq!(tag_for_keyword("checkout"), Some(FeatureTag::Payments));
        assert_eq!(tag_for_keyword("realtime"), Some(FeatureTag::Realtime));
        assert_eq!(tag_for_keyword("banana"), None);
    }
}
