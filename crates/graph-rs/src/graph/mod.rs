pub mod csr;

pub use csr::{Csr, UndirectedCsrGraph};
