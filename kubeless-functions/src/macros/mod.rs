mod select_function;
