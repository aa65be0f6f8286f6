pub mod security_framework;
