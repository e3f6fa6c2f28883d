//! vpc-reaper - default VPC removal across every region of an AWS account
//!
//! The library holds the AWS client wrappers and the sweep engine; the
//! `vpc-reaper` binary wires them to the command line.

pub mod aws;
pub mod config;
pub mod output;
pub mod sweep;
