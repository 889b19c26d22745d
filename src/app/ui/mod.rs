mod details;
mod matrix;
mod panels;
mod path;
mod search;
