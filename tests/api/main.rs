mod health_check;
mod send;
