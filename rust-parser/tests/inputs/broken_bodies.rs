pub fn meaning_of_life() -> i32 {
	this->is_not->C
}

pub fn meaning_of_foo() -> f64 { this->is->not->C }
