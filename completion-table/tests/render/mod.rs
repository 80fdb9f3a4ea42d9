mod escaping;
mod scenarios;
