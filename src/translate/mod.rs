pub mod interface;
pub mod libre;
pub mod google;
pub mod fallback;
pub mod factory;

pub use interface::{TranslateRequest, TranslationProvider, TranslationRequest, TranslationResult};
pub use libre::LibreTranslateProvider;
pub use google::GoogleTranslateProvider;
pub use fallback::FallbackTranslator;
pub use factory::TranslatorFactory;
