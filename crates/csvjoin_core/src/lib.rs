pub mod column;
pub mod join;
pub mod ordfloat;
pub mod scalar;
pub mod table;
