pub mod hive_vis2d;
