pub mod match_v5;
