mod capture;
mod clock;
mod fakes;
