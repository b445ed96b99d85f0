// sqldump2graphql: parse countries/states/cities SQL dumps with a hand-rolled
// escape-aware scanner and emit CSV, an AppSync schema, and bulk mutations.

pub mod emit;
pub mod error;
pub mod logger;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod validate;
