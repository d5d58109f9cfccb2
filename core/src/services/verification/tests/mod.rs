mod input_tests;
mod lockout_timer_tests;
