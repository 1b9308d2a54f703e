pub mod day_buttons;
