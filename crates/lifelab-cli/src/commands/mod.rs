pub mod patterns;
pub mod run;
