pub mod deepl;
pub mod google;
pub mod http;
pub mod lingva;
pub mod scrape;

pub use deepl::DeepLTranslator;
pub use google::GoogleTranslator;
pub use lingva::LingvaTranslator;
