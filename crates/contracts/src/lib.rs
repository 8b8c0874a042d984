//! Общие типы и утилиты, которые использует UI: DTO ответов API,
//! разбор полей заявок, группировка и сессия.

pub mod domain;
pub mod shared;
pub mod system;
