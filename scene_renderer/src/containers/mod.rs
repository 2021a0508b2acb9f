pub mod object_pool;
