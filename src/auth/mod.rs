pub mod credentials;
pub mod extractors;
pub mod google;
pub mod jwt;
pub mod mailer;
pub mod services;
pub mod verification;
