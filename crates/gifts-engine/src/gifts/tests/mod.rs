mod common;
mod flow;
mod tiebreak;
