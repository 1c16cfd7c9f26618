pub mod ls;
