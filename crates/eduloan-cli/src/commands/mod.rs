pub mod cash_flow;
pub mod emi;
pub mod loan;
pub mod schedule;
pub mod sensitivity;
pub mod tax;
