pub mod weatherstack;
