//! Input parsing and output serialization: the `.apx` reader, the normal-mode writer,
//! and the two solver-dump formats (`wcnf`, `lp`).

mod apx;
mod lp;
mod normal;
mod wcnf;

pub use apx::parse_apx;
pub use lp::write_lp;
pub use normal::write_normal;
pub use wcnf::write_wcnf;
