pub mod cluster_directory;
