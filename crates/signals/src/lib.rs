pub mod extract;
pub mod normalize;

pub use extract::SocialLinks;
