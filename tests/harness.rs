#![allow(non_snake_case)]

mod bet_options;
mod place_bet;
