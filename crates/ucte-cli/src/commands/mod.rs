pub mod areas;
pub mod decode;
pub mod encode;
pub mod meta;
