pub mod riskdata;
