pub mod dns_check;
pub mod dns_result;
