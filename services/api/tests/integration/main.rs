mod helpers;

mod admin_test;
mod blog_test;
mod verification_test;
