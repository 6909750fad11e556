pub fn meaning_of_life() i32 {
	42
}

fn after() {}
