mod models;
mod validate;
