pub mod config;
pub mod error;
pub mod output;
pub mod run;

pub mod github {
    pub mod issues;
    pub mod moderate;
    pub mod pagination;
    pub mod stargazers;
    pub mod transport;
}
