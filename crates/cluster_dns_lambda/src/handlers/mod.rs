pub mod cluster_event;
