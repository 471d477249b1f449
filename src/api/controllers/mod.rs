pub mod relayer;
