pub mod arguments;

pub mod poise;
pub use self::poise::Context;

pub mod serenity;
